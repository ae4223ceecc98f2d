/*!

Greedy routings. They compare candidates by length plus load and keep the best.

* `GreedyChannel` looks one hop ahead: each channel at the current node is scored by the distance from its far endpoint to the destination plus its occupancy.
* `GreedyPath` looks at whole paths: each path given by the network is scored by its length plus the occupancy that would still be there when the packet reaches each channel.

Both work on rings, tori and stars; the `Shape` gives the distance. Ties are solved as in [`select`](../../selection/fn.select.html): first lowest score, then lowest distance or length, then at random.

*/

use std::cell::RefCell;

use rand::rngs::StdRng;
use tracing::{debug,trace};

use super::{Packet,Routing,RoutingBuilderArgument,read_topology};
use crate::error::Error;
use crate::network::{ChannelIndex,Network,Occupancy};
use crate::selection::{Candidate,select};
use crate::source_location;
use crate::topology::Shape;

///What a greedy routing compares.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum GreedyMode
{
	///The channels at the current node.
	Channel,
	///The paths from the current node to the destination.
	Path,
}

///A greedy routing on a given shape. Each combination of mode and shape family is one of the greedy variants.
#[derive(Debug)]
pub struct Greedy
{
	mode: GreedyMode,
	shape: Shape,
}

impl Greedy
{
	pub fn new(arg:RoutingBuilderArgument, mode:GreedyMode) -> Result<Greedy,Error>
	{
		let name=match mode
		{
			GreedyMode::Channel => "GreedyChannel",
			GreedyMode::Path => "GreedyPath",
		};
		Ok(Greedy::with_shape(mode,read_topology(arg.cv,name)?))
	}
	pub fn with_shape(mode:GreedyMode, shape:Shape) -> Greedy
	{
		Greedy{
			mode,
			shape,
		}
	}
	pub fn mode(&self) -> GreedyMode
	{
		self.mode
	}
	///Score each channel at `current` by `distance(far endpoint, destination) + occupancy`, with the distance as secondary key.
	pub fn channel_candidates(&self, network:&dyn Network, occupancy:&dyn Occupancy, current:usize, destination:usize) -> Result<Vec<Candidate<ChannelIndex>>,Error>
	{
		let channels=network.channels_at(current)?;
		if channels.is_empty()
		{
			return Err(Error::no_incident_channels(source_location!(),current));
		}
		let mut candidates=Vec::with_capacity(channels.len());
		for &channel in channels
		{
			let neighbour=network.far_endpoint(channel,current)?;
			let distance=self.shape.distance(network,neighbour,destination)?;
			let load=occupancy.occupancy(channel);
			trace!(channel,neighbour,distance,load,"channel candidate");
			candidates.push(Candidate::new(channel,distance+load,distance));
		}
		Ok(candidates)
	}
	///Score each path from `current` to `destination` by `path_score`, with the length as secondary key.
	pub fn path_candidates(&self, network:&dyn Network, occupancy:&dyn Occupancy, current:usize, destination:usize) -> Result<Vec<Candidate<Vec<ChannelIndex>>>,Error>
	{
		let paths=network.enumerate_paths(current,destination)?;
		let mut candidates=Vec::with_capacity(paths.len());
		for path in paths.into_iter()
		{
			check_path(network,&path,current,destination)?;
			let score=path_score(&path,occupancy);
			trace!(?path,score,"path candidate");
			let length=path.len();
			candidates.push(Candidate::new(path,score,length));
		}
		if candidates.is_empty()
		{
			return Err(Error::no_path(source_location!(),current,destination));
		}
		Ok(candidates)
	}
}

impl Routing for Greedy
{
	fn route_packet(&self, network:&dyn Network, occupancy:&dyn Occupancy, current:usize, packet:&Packet, rng:&RefCell<StdRng>) -> Result<Option<ChannelIndex>,Error>
	{
		self.shape.check_network(network)?;
		network.check_address(current)?;
		network.check_address(packet.destination)?;
		if current==packet.destination
		{
			return Ok(None);
		}
		let channel=match self.mode
		{
			GreedyMode::Channel =>
			{
				let candidates=self.channel_candidates(network,occupancy,current,packet.destination)?;
				let offered=candidates.len();
				let chosen=select(candidates,rng)?;
				debug!(packet=packet.identifier,current,destination=packet.destination,offered,channel=chosen.choice,score=chosen.score,"greedy channel decision");
				chosen.choice
			},
			GreedyMode::Path =>
			{
				let candidates=self.path_candidates(network,occupancy,current,packet.destination)?;
				let offered=candidates.len();
				let chosen=select(candidates,rng)?;
				debug!(packet=packet.identifier,current,destination=packet.destination,offered,path=?chosen.choice,score=chosen.score,"greedy path decision");
				chosen.choice[0]
			},
		};
		Ok(Some(channel))
	}
	fn shape(&self) -> &Shape
	{
		&self.shape
	}
}

///The score of a path `c_0,...,c_{n-1}`: `n + sum max(occupancy(c_i)-i,0)`.
///The packet needs `i` hops to reach `c_i`, so that much of its queue is expected to be gone by then.
pub fn path_score(path:&[ChannelIndex], occupancy:&dyn Occupancy) -> usize
{
	path.len() + path.iter().enumerate().map(|(hop,&channel)|occupancy.occupancy(channel).saturating_sub(hop)).sum::<usize>()
}

///Fail unless `path` is a walk of channels from `source` to `destination`.
fn check_path(network:&dyn Network, path:&[ChannelIndex], source:usize, destination:usize) -> Result<(),Error>
{
	let mut current=source;
	for &channel in path
	{
		current=network.far_endpoint(channel,current)
			.map_err(|_|Error::ill_formed_path(source_location!(),path.to_vec()).with_message(format!("channel {} does not continue from {}",channel,current)))?;
	}
	if current!=destination
	{
		return Err(Error::ill_formed_path(source_location!(),path.to_vec()).with_message(format!("the path from {} ends at {} instead of {}",source,current,destination)));
	}
	Ok(())
}

#[cfg(test)]
mod tests
{
	use super::*;
	use rand::SeedableRng;
	use crate::error::ErrorKind;
	use crate::network::{Channel,ChannelLoads,PathPolicy};
	use crate::network::neighbourslists::NeighboursLists;

	fn rng(seed:u64) -> RefCell<StdRng>
	{
		RefCell::new(StdRng::seed_from_u64(seed))
	}

	fn greedy_variants(shape:&Shape) -> Vec<Greedy>
	{
		vec![Greedy::with_shape(GreedyMode::Channel,shape.clone()),Greedy::with_shape(GreedyMode::Path,shape.clone())]
	}

	#[test]
	fn arrival_iff_at_destination()
	{
		let shapes=vec![Shape::ring(5).unwrap(),Shape::torus(3,4).unwrap(),Shape::star(2,3).unwrap()];
		let rng=rng(1);
		for shape in shapes.iter()
		{
			let network=NeighboursLists::from_shape(shape).unwrap();
			let loads=ChannelLoads::new(network.num_channels());
			for routing in greedy_variants(shape).iter()
			{
				for current in 0..network.num_nodes()
				{
					for destination in 0..network.num_nodes()
					{
						let packet=Packet::new(7,0,destination);
						let decision=routing.route_packet(&network,&loads,current,&packet,&rng).unwrap();
						match decision
						{
							None => assert_eq!(current,destination),
							Some(channel) =>
							{
								assert_ne!(current,destination);
								assert!(network.channels_at(current).unwrap().contains(&channel));
							},
						}
					}
				}
			}
		}
	}

	#[test]
	fn ring_of_five()
	{
		//From 1 to 4 the shorter arc goes by 0, which is adjacent to 4.
		let shape=Shape::ring(5).unwrap();
		let network=NeighboursLists::from_shape(&shape).unwrap();
		assert_eq!(shape.distance(&network,1,4).unwrap(),2);
		assert_eq!(shape.distance(&network,0,4).unwrap(),1);
		assert_eq!(shape.distance(&network,2,4).unwrap(),2);
		let towards_0=network.channel_between(1,0).unwrap().unwrap();
		let towards_2=network.channel_between(1,2).unwrap().unwrap();
		let routing=Greedy::with_shape(GreedyMode::Channel,shape.clone());
		let mut loads=ChannelLoads::new(network.num_channels());
		let packet=Packet::new(0,1,4);
		let candidates=routing.channel_candidates(&network,&loads,1,4).unwrap();
		let mut scores=candidates.iter().map(|candidate|(candidate.choice,candidate.score,candidate.secondary)).collect::<Vec<_>>();
		scores.sort_unstable();
		let mut expected=vec![(towards_0,1,1),(towards_2,2,2)];
		expected.sort_unstable();
		assert_eq!(scores,expected);
		for seed in 0..20
		{
			assert_eq!(routing.route_packet(&network,&loads,1,&packet,&rng(seed)).unwrap(),Some(towards_0));
		}
		//Loading the channel to 0 makes both score 2. The distance decides.
		loads.set(towards_0,1).unwrap();
		for seed in 0..20
		{
			assert_eq!(routing.route_packet(&network,&loads,1,&packet,&rng(seed)).unwrap(),Some(towards_0));
		}
		//With one more packet queued the channel to 2 is strictly better.
		loads.set(towards_0,2).unwrap();
		assert_eq!(routing.route_packet(&network,&loads,1,&packet,&rng(0)).unwrap(),Some(towards_2));
	}

	#[test]
	fn exact_ties_reach_every_survivor()
	{
		//In a ring of 4 the node 2 is at distance 2 from 0 by both sides.
		let shape=Shape::ring(4).unwrap();
		let network=NeighboursLists::from_shape(&shape).unwrap();
		let loads=ChannelLoads::new(network.num_channels());
		let packet=Packet::new(1,0,2);
		let mut expected=network.channels_at(0).unwrap().to_vec();
		expected.sort_unstable();
		for routing in greedy_variants(&shape).iter()
		{
			let mut seen=vec![];
			for seed in 0..100
			{
				let channel=routing.route_packet(&network,&loads,0,&packet,&rng(seed)).unwrap().unwrap();
				if !seen.contains(&channel)
				{
					seen.push(channel);
				}
			}
			seen.sort_unstable();
			assert_eq!(seen,expected,"{:?}",routing.mode());
		}
	}

	#[test]
	fn unique_winner_ignores_the_seed()
	{
		//In a 4x4 torus from (0,0) to (1,1), the channels towards (1,0) and (0,1) tie unless loaded.
		let shape=Shape::torus(4,4).unwrap();
		let network=NeighboursLists::from_shape(&shape).unwrap();
		let source=shape.torus_address([0,0]).unwrap().unwrap();
		let destination=shape.torus_address([1,1]).unwrap().unwrap();
		let east=network.channel_between(source,shape.torus_address([1,0]).unwrap().unwrap()).unwrap().unwrap();
		let north=network.channel_between(source,shape.torus_address([0,1]).unwrap().unwrap()).unwrap().unwrap();
		let mut loads=ChannelLoads::new(network.num_channels());
		loads.set(east,1).unwrap();
		let packet=Packet::new(0,source,destination);
		for routing in greedy_variants(&shape).iter()
		{
			let first=routing.route_packet(&network,&loads,source,&packet,&rng(0)).unwrap();
			assert_eq!(first,Some(north));
			for seed in 1..50
			{
				//Same loads, same answer.
				assert_eq!(routing.route_packet(&network,&loads,source,&packet,&rng(seed)).unwrap(),first);
			}
		}
	}

	#[test]
	fn occupancy_deflects_channel_mode()
	{
		//In a ring of 7 from 0 to 2, going by 1 has distance 1 and going by 6 has distance 3.
		let shape=Shape::ring(7).unwrap();
		let network=NeighboursLists::from_shape(&shape).unwrap();
		let routing=Greedy::with_shape(GreedyMode::Channel,shape);
		let short=network.channel_between(0,1).unwrap().unwrap();
		let long=network.channel_between(0,6).unwrap().unwrap();
		let packet=Packet::new(0,0,2);
		let mut loads=ChannelLoads::new(network.num_channels());
		//1+2 against 3+0: equal score, but the shorter distance wins.
		loads.set(short,2).unwrap();
		assert_eq!(routing.route_packet(&network,&loads,0,&packet,&rng(5)).unwrap(),Some(short));
		//1+3 against 3+0.
		loads.set(short,3).unwrap();
		assert_eq!(routing.route_packet(&network,&loads,0,&packet,&rng(5)).unwrap(),Some(long));
	}

	#[test]
	fn path_scores()
	{
		let idle:Vec<usize>=vec![];
		assert_eq!(path_score(&[4],&idle),1);
		assert_eq!(path_score(&[],&idle),0);
		//Every occupancy at most its hop index.
		let loads:Vec<usize>=vec![0,1,2,3];
		assert_eq!(path_score(&[0,1,2,3],&loads),4);
		assert_eq!(path_score(&[3,2,1,0],&loads),4+3+1);
		let loads:Vec<usize>=vec![5,5,5];
		assert_eq!(path_score(&[0,1,2],&loads),3+5+4+3);
	}

	#[test]
	fn path_mode_breaks_score_ties_by_length()
	{
		//Every simple path of a ring of 5 from 1 to 4: by 0 in two hops or by 2 and 3 in three.
		let shape=Shape::ring(5).unwrap();
		let network=NeighboursLists::ring(5).unwrap().with_path_policy(PathPolicy::Simple{max_length:None});
		let routing=Greedy::with_shape(GreedyMode::Path,shape);
		let towards_0=network.channel_between(1,0).unwrap().unwrap();
		let mut loads=ChannelLoads::new(network.num_channels());
		//The short path scores 2+1, the long one 3+0.
		loads.set(towards_0,1).unwrap();
		let candidates=routing.path_candidates(&network,&loads,1,4).unwrap();
		let mut keys=candidates.iter().map(|candidate|(candidate.score,candidate.secondary)).collect::<Vec<_>>();
		keys.sort_unstable();
		assert_eq!(keys,vec![(3,2),(3,3)]);
		let packet=Packet::new(0,1,4);
		for seed in 0..50
		{
			assert_eq!(routing.route_packet(&network,&loads,1,&packet,&rng(seed)).unwrap(),Some(towards_0));
		}
	}

	#[test]
	fn path_mode_avoids_loaded_paths()
	{
		//5x4 torus from (0,0) to (2,1): three minimal paths, through (1,0)(2,0), (1,0)(1,1) or (0,1)(1,1).
		let shape=Shape::torus(5,4).unwrap();
		let network=NeighboursLists::from_shape(&shape).unwrap();
		let at=|x:usize,y:usize|shape.torus_address([x,y]).unwrap().unwrap();
		let routing=Greedy::with_shape(GreedyMode::Path,shape.clone());
		let packet=Packet::new(0,at(0,0),at(2,1));
		let east=network.channel_between(at(0,0),at(1,0)).unwrap().unwrap();
		let north=network.channel_between(at(0,0),at(0,1)).unwrap().unwrap();
		let mut loads=ChannelLoads::new(network.num_channels());
		//A load of 1 on a second hop is absorbed, a load of 2 on the last hop only partly.
		loads.set(network.channel_between(at(1,0),at(2,0)).unwrap().unwrap(),1).unwrap();
		loads.set(network.channel_between(at(2,0),at(2,1)).unwrap().unwrap(),3).unwrap();
		loads.set(network.channel_between(at(1,0),at(1,1)).unwrap().unwrap(),2).unwrap();
		loads.set(network.channel_between(at(1,1),at(2,1)).unwrap().unwrap(),2).unwrap();
		let candidates=routing.path_candidates(&network,&loads,at(0,0),at(2,1)).unwrap();
		let mut scores=candidates.iter().map(|candidate|candidate.score).collect::<Vec<usize>>();
		scores.sort_unstable();
		//(0,1)(1,1): 3+0+0+0. (1,0)(1,1): 3+0+1+0. (1,0)(2,0): 3+0+0+1.
		assert_eq!(scores,vec![3,4,4]);
		for seed in 0..20
		{
			assert_eq!(routing.route_packet(&network,&loads,at(0,0),&packet,&rng(seed)).unwrap(),Some(north));
		}
		loads.set(north,2).unwrap();
		//Now the path by the north starts with 2 queued: 3+2+0 against 4 and 4, so east.
		for seed in 0..20
		{
			assert_eq!(routing.route_packet(&network,&loads,at(0,0),&packet,&rng(seed)).unwrap(),Some(east));
		}
	}

	#[test]
	fn star_routes_through_a_hub()
	{
		let shape=Shape::star(1,3).unwrap();
		let network=NeighboursLists::from_shape(&shape).unwrap();
		let loads=ChannelLoads::new(network.num_channels());
		for routing in greedy_variants(&shape).iter()
		{
			for spoke in 1..4
			{
				for other in 1..4
				{
					if spoke==other
					{
						continue;
					}
					assert_eq!(shape.distance(&network,spoke,other).unwrap(),2);
					let channel=routing.route_packet(&network,&loads,spoke,&Packet::new(0,spoke,other),&rng(2)).unwrap().unwrap();
					assert_eq!(network.far_endpoint(channel,spoke).unwrap(),0);
				}
				assert_eq!(shape.distance(&network,0,spoke).unwrap(),1);
				let channel=routing.route_packet(&network,&loads,0,&Packet::new(0,0,spoke),&rng(2)).unwrap().unwrap();
				assert_eq!(network.far_endpoint(channel,0).unwrap(),spoke);
			}
		}
	}

	///A network whose paths can be replaced at will.
	#[derive(Debug)]
	struct FixedPaths
	{
		inner: NeighboursLists,
		paths: Vec<Vec<ChannelIndex>>,
	}

	impl Network for FixedPaths
	{
		fn num_nodes(&self) -> usize { self.inner.num_nodes() }
		fn num_channels(&self) -> usize { self.inner.num_channels() }
		fn channels_at(&self, address:usize) -> Result<&[ChannelIndex],Error> { self.inner.channels_at(address) }
		fn channel(&self, index:ChannelIndex) -> Result<&Channel,Error> { self.inner.channel(index) }
		fn enumerate_paths(&self, _source:usize, _destination:usize) -> Result<Vec<Vec<ChannelIndex>>,Error> { Ok(self.paths.clone()) }
	}

	#[test]
	fn precondition_violations()
	{
		let shape=Shape::ring(4).unwrap();
		let ring=NeighboursLists::from_shape(&shape).unwrap();
		let loads=ChannelLoads::new(ring.num_channels());
		let rng=rng(0);
		let channel_mode=Greedy::with_shape(GreedyMode::Channel,shape.clone());
		let path_mode=Greedy::with_shape(GreedyMode::Path,shape.clone());
		for routing in [&channel_mode,&path_mode].iter()
		{
			assert!(matches!(routing.route_packet(&ring,&loads,4,&Packet::new(0,0,1),&rng).unwrap_err().kind,ErrorKind::UnknownAddress{address:4,..}));
			assert!(matches!(routing.route_packet(&ring,&loads,0,&Packet::new(0,0,9),&rng).unwrap_err().kind,ErrorKind::UnknownAddress{address:9,..}));
			let bigger=NeighboursLists::ring(6).unwrap();
			assert!(matches!(routing.route_packet(&bigger,&loads,0,&Packet::new(0,0,1),&rng).unwrap_err().kind,ErrorKind::ShapeMismatch{..}));
		}
		//Node 3 has no channels.
		let isolated=NeighboursLists::new(4,&[(0,1),(1,2),(2,0)]).unwrap();
		assert!(matches!(channel_mode.route_packet(&isolated,&loads,3,&Packet::new(0,3,0),&rng).unwrap_err().kind,ErrorKind::NoIncidentChannels{address:3}));
		assert!(matches!(path_mode.route_packet(&isolated,&loads,0,&Packet::new(0,0,3),&rng).unwrap_err().kind,ErrorKind::NoPath{..}));
		//Paths that do not start at the current node or do not reach the destination.
		let c01=ring.channel_between(0,1).unwrap().unwrap();
		let c12=ring.channel_between(1,2).unwrap().unwrap();
		let c23=ring.channel_between(2,3).unwrap().unwrap();
		for paths in vec![vec![vec![c12,c23]],vec![vec![c01]],vec![vec![]],vec![vec![c01,c12],vec![c01,c23]]]
		{
			let network=FixedPaths{inner:NeighboursLists::ring(4).unwrap(),paths};
			assert!(matches!(path_mode.route_packet(&network,&loads,0,&Packet::new(0,0,2),&rng).unwrap_err().kind,ErrorKind::IllFormedPath{..}));
		}
		let network=FixedPaths{inner:NeighboursLists::ring(4).unwrap(),paths:vec![]};
		assert!(matches!(path_mode.route_packet(&network,&loads,0,&Packet::new(0,0,2),&rng).unwrap_err().kind,ErrorKind::NoPath{..}));
		let network=FixedPaths{inner:NeighboursLists::ring(4).unwrap(),paths:vec![vec![c01,c12]]};
		assert_eq!(path_mode.route_packet(&network,&loads,0,&Packet::new(0,0,2),&rng).unwrap(),Some(c01));
	}
}
